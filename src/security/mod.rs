//! Security subsystem.
//!
//! Currently limited to Host header validation: the dev server refuses
//! requests whose Host header is not in the configured allow list, which
//! blocks DNS-rebinding style access to a developer's machine.

pub mod allowed_hosts;

pub use allowed_hosts::HostFilter;
