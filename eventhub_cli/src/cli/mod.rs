mod attendees;
mod auth;
mod common;
mod dashboard;
mod events;
mod health;
mod root;
mod sponsors;
mod tickets;
mod view;

pub(crate) use root::get_args;
