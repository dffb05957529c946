//! In-process IAMS double used by the suite tests

#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::TcpListener,
    path::PathBuf,
    sync::Mutex,
};

use actix_web::{dev::ServerHandle, web, App, HttpRequest, HttpResponse, HttpServer};
use iams_e2e::config::{ApiConfig, AuthConfig, E2eConfig, HttpConfig, PollConfig};
use serde_json::{json, Value};

pub const TOKEN_PATH: &str = "/realms/AOH/protocol/openid-connect/token";
pub const USERNAME: &str = "agiltester";
pub const PASSWORD: &str = "secret";
pub const CLIENT_ID: &str = "web";
pub const ACCESS_TOKEN: &str = "mock-access-token";
pub const REFRESH_TOKEN: &str = "mock-refresh-token";

/// Knobs for failure and latency injection
#[derive(Debug, Clone)]
pub struct Behavior {
    /// Membership listings that still hide a freshly added member
    pub membership_visible_after: u32,
    pub fail_user_create: bool,
    pub scope_delete_status: u16,
    pub membership_remove_status: u16,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            membership_visible_after: 0,
            fail_user_create: false,
            scope_delete_status: 200,
            membership_remove_status: 204,
        }
    }
}

#[derive(Debug, Clone)]
struct UserRec {
    username: String,
    email: String,
    enabled: bool,
}

#[derive(Debug, Clone)]
struct RoleRec {
    id: String,
    name: String,
    description: Option<String>,
    client_role: bool,
    container_id: Option<String>,
}

#[derive(Debug, Clone)]
struct ResourceRec {
    id: String,
    name: String,
    scopes: Vec<String>,
}

#[derive(Debug, Clone)]
struct PermissionRec {
    resource_id: String,
    user_id: String,
    scopes: Vec<String>,
}

#[derive(Debug, Default)]
struct TenantRec {
    name: String,
    members: Vec<String>,
    hidden: HashMap<String, u32>,
    roles: Vec<RoleRec>,
    user_roles: HashMap<String, Vec<String>>,
    scopes: Vec<(String, String)>,
    resources: Vec<ResourceRec>,
    permissions: Vec<PermissionRec>,
}

#[derive(Debug, Default)]
struct Store {
    next_id: u64,
    tenants: HashMap<String, TenantRec>,
    users: HashMap<String, UserRec>,
    requests: Vec<String>,
    token_requests: u32,
}

struct MockState {
    behavior: Behavior,
    store: Mutex<Store>,
}

fn next_id(counter: &mut u64, prefix: &str) -> String {
    *counter += 1;
    format!("{}-{:04}", prefix, counter)
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({"error": "Not Found"}))
}

fn status(code: u16) -> HttpResponse {
    HttpResponse::build(actix_web::http::StatusCode::from_u16(code).unwrap()).finish()
}

fn str_field(body: &Value, field: &str) -> Option<String> {
    body.get(field).and_then(Value::as_str).map(str::to_string)
}

fn user_json(id: &str, user: Option<&UserRec>) -> Value {
    match user {
        Some(user) => json!({
            "id": id,
            "username": user.username,
            "email": user.email,
            "enabled": user.enabled,
        }),
        None => json!({ "id": id }),
    }
}

fn role_json(role: &RoleRec) -> Value {
    json!({
        "id": role.id,
        "name": role.name,
        "description": role.description,
        "clientRole": role.client_role,
        "containerId": role.container_id,
    })
}

fn resource_json(resource: &ResourceRec) -> Value {
    json!({ "id": resource.id, "name": resource.name, "scopes": resource.scopes })
}

fn string_list(body: &Value, field: &str) -> Vec<String> {
    body.get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .map(|items| items.iter().filter_map(|item| str_field(item, "id")).collect())
        .unwrap_or_default()
}

async fn token(form: web::Form<HashMap<String, String>>, state: web::Data<MockState>) -> HttpResponse {
    state.store.lock().unwrap().token_requests += 1;

    let field = |name: &str| form.get(name).map(String::as_str);
    let granted = match field("grant_type") {
        Some("password") => {
            field("username") == Some(USERNAME)
                && field("password") == Some(PASSWORD)
                && field("client_id") == Some(CLIENT_ID)
        }
        Some("refresh_token") => field("refresh_token") == Some(REFRESH_TOKEN),
        _ => false,
    };

    if granted {
        HttpResponse::Ok().json(json!({
            "access_token": ACCESS_TOKEN,
            "refresh_token": REFRESH_TOKEN,
            "expires_in": 300,
            "token_type": "Bearer",
        }))
    } else {
        HttpResponse::Unauthorized().json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid user credentials",
        }))
    }
}

async fn admin(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    let expected = format!("Bearer {}", ACCESS_TOKEN);
    let authorized = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == expected);
    if !authorized {
        return HttpResponse::Unauthorized().finish();
    }

    let Some(path) = req.path().strip_prefix("/admin") else {
        return not_found();
    };
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let mut store = state.store.lock().unwrap();
    store
        .requests
        .push(format!("{} {}", req.method(), req.path()));
    route(&mut store, &state.behavior, req.method().as_str(), &segments, &body)
}

fn route(store: &mut Store, behavior: &Behavior, method: &str, segments: &[&str], body: &Value) -> HttpResponse {
    match (method, segments) {
        ("POST", ["tenants"]) => {
            let Some(name) = str_field(body, "name") else {
                return status(400);
            };
            let id = next_id(&mut store.next_id, "tenant");
            store.tenants.insert(
                id.clone(),
                TenantRec {
                    name,
                    ..Default::default()
                },
            );
            HttpResponse::Created().body(id)
        }
        ("GET", ["tenants"]) => {
            let tenants: Vec<Value> = store
                .tenants
                .iter()
                .map(|(id, t)| json!({"id": id, "name": t.name}))
                .collect();
            HttpResponse::Ok().json(tenants)
        }
        ("DELETE", ["tenants", tenant_id]) => match store.tenants.remove(*tenant_id) {
            Some(_) => status(204),
            None => not_found(),
        },
        (_, ["tenants", tenant_id]) => match (method, store.tenants.get_mut(*tenant_id)) {
            (_, None) => not_found(),
            ("GET", Some(t)) => HttpResponse::Ok().json(json!({"id": tenant_id, "name": t.name})),
            ("PUT", Some(t)) => {
                if let Some(name) = str_field(body, "name") {
                    t.name = name;
                }
                status(200)
            }
            _ => status(405),
        },
        ("POST", ["users"]) => {
            if behavior.fail_user_create {
                return HttpResponse::InternalServerError().body("user store unavailable");
            }
            let (Some(username), Some(email)) = (str_field(body, "username"), str_field(body, "email")) else {
                return status(400);
            };
            let enabled = body.get("enabled").and_then(Value::as_bool).unwrap_or(false);
            let id = next_id(&mut store.next_id, "user");
            store.users.insert(
                id.clone(),
                UserRec {
                    username,
                    email,
                    enabled,
                },
            );
            HttpResponse::Created().body(id)
        }
        ("DELETE", ["users", user_id]) => match store.users.remove(*user_id) {
            Some(_) => status(204),
            None => not_found(),
        },
        (_, ["users", user_id]) => match (method, store.users.get_mut(*user_id)) {
            (_, None) => not_found(),
            ("GET", Some(u)) => HttpResponse::Ok().json(user_json(user_id, Some(u))),
            ("PUT", Some(u)) => {
                if let Some(email) = str_field(body, "email") {
                    u.email = email;
                }
                if let Some(username) = str_field(body, "username") {
                    u.username = username;
                }
                status(200)
            }
            _ => status(405),
        },
        (_, ["tenants", tenant_id, rest @ ..]) => {
            let Store {
                next_id: counter,
                tenants,
                users,
                ..
            } = store;
            match tenants.get_mut(*tenant_id) {
                Some(tenant) => tenant_route(tenant, users, counter, behavior, method, rest, body),
                None => not_found(),
            }
        }
        _ => not_found(),
    }
}

fn tenant_route(
    tenant: &mut TenantRec,
    users: &HashMap<String, UserRec>,
    counter: &mut u64,
    behavior: &Behavior,
    method: &str,
    segments: &[&str],
    body: &Value,
) -> HttpResponse {
    match (method, segments) {
        // memberships
        ("GET", ["memberships"]) => {
            let mut visible = Vec::new();
            for member in &tenant.members {
                match tenant.hidden.get_mut(member) {
                    Some(remaining) if *remaining > 0 => *remaining -= 1,
                    _ => visible.push(user_json(member, users.get(member))),
                }
            }
            HttpResponse::Ok().json(visible)
        }
        ("GET", ["memberships", "count"]) => HttpResponse::Ok().body(tenant.members.len().to_string()),
        ("POST", ["memberships", user_id]) => {
            if !users.contains_key(*user_id) {
                return not_found();
            }
            if tenant.members.iter().any(|m| m == user_id) {
                return status(409);
            }
            tenant.members.push(user_id.to_string());
            tenant
                .hidden
                .insert(user_id.to_string(), behavior.membership_visible_after);
            status(201)
        }
        ("DELETE", ["memberships", user_id]) => {
            let before = tenant.members.len();
            tenant.members.retain(|m| m != user_id);
            if tenant.members.len() == before {
                return not_found();
            }
            status(behavior.membership_remove_status)
        }

        // roles
        ("POST", ["roles"]) => {
            let Some(name) = str_field(body, "name") else {
                return status(400);
            };
            if tenant.roles.iter().any(|r| r.name == name) {
                return status(409);
            }
            let id = next_id(counter, "role");
            tenant.roles.push(RoleRec {
                id: id.clone(),
                name,
                description: str_field(body, "description"),
                client_role: body.get("clientRole").and_then(Value::as_bool).unwrap_or(false),
                container_id: str_field(body, "containerId"),
            });
            HttpResponse::Created().json(id)
        }
        ("GET", ["roles"]) => {
            HttpResponse::Ok().json(tenant.roles.iter().map(role_json).collect::<Vec<_>>())
        }
        (_, ["roles", role_name]) => {
            let Some(index) = tenant.roles.iter().position(|r| r.name == *role_name) else {
                return not_found();
            };
            match method {
                "GET" => HttpResponse::Ok().json(role_json(&tenant.roles[index])),
                "PUT" => {
                    let role = &mut tenant.roles[index];
                    if let Some(name) = str_field(body, "name") {
                        role.name = name;
                    }
                    role.description = str_field(body, "description");
                    status(200)
                }
                "DELETE" => {
                    let role = tenant.roles.remove(index);
                    for assigned in tenant.user_roles.values_mut() {
                        assigned.retain(|id| *id != role.id);
                    }
                    status(200)
                }
                _ => status(405),
            }
        }
        (_, ["roles-by-id", role_id]) => {
            let Some(index) = tenant.roles.iter().position(|r| r.id == *role_id) else {
                return not_found();
            };
            match method {
                "GET" => HttpResponse::Ok().json(role_json(&tenant.roles[index])),
                "DELETE" => {
                    tenant.roles.remove(index);
                    for assigned in tenant.user_roles.values_mut() {
                        assigned.retain(|id| id != role_id);
                    }
                    status(200)
                }
                _ => status(405),
            }
        }
        (_, ["users", user_id, "roles"]) => {
            if !users.contains_key(*user_id) {
                return not_found();
            }
            match method {
                "POST" => {
                    let wanted = ids(body);
                    if wanted.iter().any(|id| !tenant.roles.iter().any(|r| &r.id == id)) {
                        return not_found();
                    }
                    let assigned = tenant.user_roles.entry(user_id.to_string()).or_default();
                    for id in wanted {
                        if !assigned.contains(&id) {
                            assigned.push(id);
                        }
                    }
                    status(201)
                }
                "GET" => {
                    let assigned = tenant.user_roles.get(*user_id).cloned().unwrap_or_default();
                    let roles: Vec<Value> = tenant
                        .roles
                        .iter()
                        .filter(|r| assigned.contains(&r.id))
                        .map(role_json)
                        .collect();
                    HttpResponse::Ok().json(roles)
                }
                "DELETE" => {
                    let wanted = ids(body);
                    if let Some(assigned) = tenant.user_roles.get_mut(*user_id) {
                        assigned.retain(|id| !wanted.contains(id));
                    }
                    status(200)
                }
                _ => status(405),
            }
        }
        (_, ["roles", role_name, "users", rest @ ..]) => {
            let Some(role_id) = tenant
                .roles
                .iter()
                .find(|r| r.name == *role_name)
                .map(|r| r.id.clone())
            else {
                return not_found();
            };
            match (method, rest) {
                ("POST", []) => {
                    let wanted = ids(body);
                    if wanted.iter().any(|id| !users.contains_key(id)) {
                        return not_found();
                    }
                    for user_id in wanted {
                        let assigned = tenant.user_roles.entry(user_id).or_default();
                        if !assigned.contains(&role_id) {
                            assigned.push(role_id.clone());
                        }
                    }
                    status(201)
                }
                ("GET", []) => {
                    let members: Vec<Value> = tenant
                        .user_roles
                        .iter()
                        .filter(|(_, assigned)| assigned.contains(&role_id))
                        .map(|(user_id, _)| user_json(user_id, users.get(user_id)))
                        .collect();
                    HttpResponse::Ok().json(members)
                }
                ("DELETE", [user_id]) => match tenant.user_roles.get_mut(*user_id) {
                    Some(assigned) if assigned.contains(&role_id) => {
                        assigned.retain(|id| *id != role_id);
                        status(200)
                    }
                    _ => not_found(),
                },
                _ => status(405),
            }
        }

        // scopes
        ("POST", ["scopes"]) => {
            let Some(name) = str_field(body, "name") else {
                return status(400);
            };
            let id = next_id(counter, "scope");
            tenant.scopes.push((id.clone(), name));
            HttpResponse::Created().body(id)
        }
        ("GET", ["scopes"]) => {
            let scopes: Vec<Value> = tenant
                .scopes
                .iter()
                .map(|(id, name)| json!({"id": id, "name": name}))
                .collect();
            HttpResponse::Ok().json(scopes)
        }
        (_, ["scopes", scope_id]) => {
            let Some(index) = tenant.scopes.iter().position(|(id, _)| id == scope_id) else {
                return not_found();
            };
            match method {
                "PUT" => {
                    if let Some(name) = str_field(body, "name") {
                        tenant.scopes[index].1 = name;
                    }
                    status(200)
                }
                "DELETE" => {
                    tenant.scopes.remove(index);
                    status(behavior.scope_delete_status)
                }
                _ => status(405),
            }
        }
        ("GET", ["scopes", scope_id, "resources"]) => {
            if !tenant.scopes.iter().any(|(id, _)| id == scope_id) {
                return not_found();
            }
            let resources: Vec<Value> = tenant
                .resources
                .iter()
                .filter(|r| r.scopes.iter().any(|s| s == scope_id))
                .map(resource_json)
                .collect();
            HttpResponse::Ok().json(resources)
        }

        // resources and permissions
        ("POST", ["resources"]) => {
            let Some(name) = str_field(body, "name") else {
                return status(400);
            };
            let id = next_id(counter, "resource");
            tenant.resources.push(ResourceRec {
                id: id.clone(),
                name,
                scopes: string_list(body, "scopes"),
            });
            HttpResponse::Created().body(id)
        }
        ("GET", ["resources"]) => {
            HttpResponse::Ok().json(tenant.resources.iter().map(resource_json).collect::<Vec<_>>())
        }
        (_, ["resources", resource_id]) => {
            let Some(index) = tenant.resources.iter().position(|r| r.id == *resource_id) else {
                return not_found();
            };
            match method {
                "GET" => HttpResponse::Ok().json(resource_json(&tenant.resources[index])),
                "PUT" => {
                    let resource = &mut tenant.resources[index];
                    if let Some(name) = str_field(body, "name") {
                        resource.name = name;
                    }
                    resource.scopes = string_list(body, "scopes");
                    status(200)
                }
                "DELETE" => {
                    tenant.resources.remove(index);
                    tenant.permissions.retain(|p| p.resource_id != *resource_id);
                    status(204)
                }
                _ => status(405),
            }
        }
        ("POST", ["resources", resource_id, "permissions"]) => {
            let Some(user_id) = str_field(body, "userId") else {
                return status(400);
            };
            if !tenant.resources.iter().any(|r| r.id == *resource_id) || !users.contains_key(&user_id) {
                return not_found();
            }
            tenant.permissions.push(PermissionRec {
                resource_id: resource_id.to_string(),
                user_id,
                scopes: string_list(body, "scopes"),
            });
            status(201)
        }
        ("DELETE", ["resources", resource_id, "permissions", user_id]) => {
            let before = tenant.permissions.len();
            tenant
                .permissions
                .retain(|p| !(p.resource_id == *resource_id && p.user_id == *user_id));
            if tenant.permissions.len() == before {
                return not_found();
            }
            status(204)
        }
        ("GET", ["users", user_id, "permissions"]) => {
            let permissions: Vec<Value> = tenant
                .permissions
                .iter()
                .filter(|p| p.user_id == *user_id)
                .map(|p| json!({"resourceId": p.resource_id, "scopes": p.scopes}))
                .collect();
            HttpResponse::Ok().json(permissions)
        }
        _ => not_found(),
    }
}

/// Running IAMS double bound to an ephemeral port
pub struct MockIams {
    pub url: String,
    state: web::Data<MockState>,
    handle: ServerHandle,
}

impl MockIams {
    pub async fn start() -> Self {
        Self::start_with(Behavior::default()).await
    }

    pub async fn start_with(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        let state = web::Data::new(MockState {
            behavior,
            store: Mutex::new(Store::default()),
        });
        let app_state = state.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route(TOKEN_PATH, web::post().to(token))
                .default_service(web::to(admin))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .expect("Failed to listen on mock IAMS socket")
        .run();

        let handle = server.handle();
        tokio::spawn(server);

        Self {
            url: format!("http://127.0.0.1:{}", port),
            state,
            handle,
        }
    }

    pub fn token_url(&self) -> String {
        format!("{}{}", self.url, TOKEN_PATH)
    }

    /// Suite configuration pointing at this double
    pub fn config(&self, token_file: PathBuf) -> E2eConfig {
        E2eConfig {
            api: ApiConfig {
                base_url: self.url.clone(),
            },
            auth: AuthConfig {
                token_url: self.token_url(),
                client_id: CLIENT_ID.to_string(),
                username: USERNAME.to_string(),
                password: PASSWORD.to_string(),
                scope: "openid".to_string(),
                token_file,
            },
            poll: PollConfig {
                timeout_secs: 5,
                interval_ms: 10,
            },
            http: HttpConfig { timeout_secs: 10 },
        }
    }

    pub fn tenant_count(&self) -> usize {
        self.state.store.lock().unwrap().tenants.len()
    }

    pub fn user_count(&self) -> usize {
        self.state.store.lock().unwrap().users.len()
    }

    pub fn token_requests(&self) -> u32 {
        self.state.store.lock().unwrap().token_requests
    }

    /// Admin requests seen so far, as `METHOD /path`
    pub fn requests(&self) -> Vec<String> {
        self.state.store.lock().unwrap().requests.clone()
    }

    pub fn count_requests(&self, line: &str) -> usize {
        self.requests().iter().filter(|r| r.as_str() == line).count()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

/// Keeps the temp dir alive alongside the token file path inside it
pub struct TokenDir {
    pub dir: tempfile::TempDir,
}

impl TokenDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn token_file(&self) -> PathBuf {
        self.dir.path().join(".auth/auth.json")
    }
}
