pub mod issue;
pub mod ticket;
