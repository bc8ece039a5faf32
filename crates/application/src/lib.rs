//! Application services and ports for the authorization engine.

#![forbid(unsafe_code)]

mod permission_ports;
mod permission_service;

pub use permission_ports::RolePermissionRepository;
pub use permission_service::{AccessDecision, PermissionService};
