pub mod freshservice;
pub mod github;
pub mod http;
