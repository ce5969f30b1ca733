//! Project-related CI endpoints

use crate::CircleClient;
use crate::error::Result;
use launchpad_core::domain::project::Project;

impl CircleClient {
    /// List every project followed by the token's user
    ///
    /// # Returns
    /// The full project list, in the order the CI service returns it
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.get_json("/projects").await
    }
}
