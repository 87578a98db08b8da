mod confluence;
mod jira;

pub use confluence::ConfluenceServer;
pub use jira::JiraServer;
