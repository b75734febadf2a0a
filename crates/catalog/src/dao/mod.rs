pub mod service_dao;
pub mod version_dao;
