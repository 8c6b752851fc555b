pub mod jwt_middleware;
pub mod security;
