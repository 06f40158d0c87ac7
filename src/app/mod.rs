//! Core application logic: state, the collection controller, the detail
//! component, and event handling.

pub mod action;
pub mod controller;
pub mod detail;
pub mod event;
pub mod handler;
pub mod state;
