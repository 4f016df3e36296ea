pub mod common;

pub mod err;

pub mod projects;

pub mod sprints;

pub mod users;
