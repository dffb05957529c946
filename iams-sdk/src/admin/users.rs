use reqwest::StatusCode;

use crate::{
    client::{segment, IamsClient, OK_OR_NO_CONTENT},
    error::IamsError,
    types::{User, UserRequest},
};

/// `/admin/users`
pub struct UsersApi<'a> {
    client: &'a IamsClient,
}

impl<'a> UsersApi<'a> {
    pub fn new(client: &'a IamsClient) -> Self {
        Self { client }
    }

    /// Create a user and return its id
    pub async fn create(&self, request: &UserRequest) -> Result<String, IamsError> {
        self.client
            .post("/users", Some(request))
            .await?
            .expect_status("create user", &[201])?
            .created_id()
    }

    pub async fn get(&self, user_id: &str) -> Result<User, IamsError> {
        self.client
            .get(&format!("/users/{}", segment(user_id)))
            .await?
            .expect_status("get user", &[200])?
            .json()
    }

    pub async fn update(&self, user_id: &str, request: &UserRequest) -> Result<(), IamsError> {
        self.client
            .put(&format!("/users/{}", segment(user_id)), request)
            .await?
            .expect_status("update user", OK_OR_NO_CONTENT)?;
        Ok(())
    }

    pub async fn delete(&self, user_id: &str) -> Result<StatusCode, IamsError> {
        let response = self
            .client
            .delete(&format!("/users/{}", segment(user_id)))
            .await?
            .expect_status("delete user", OK_OR_NO_CONTENT)?;
        Ok(response.status)
    }
}
