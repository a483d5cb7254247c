pub mod entity;
pub mod errors;
pub mod mapper;
pub mod migrations;
pub mod query;
pub mod sea_orm_repo;
