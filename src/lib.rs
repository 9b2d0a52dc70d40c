pub mod commands;
pub mod fs;
pub mod logging;
pub mod sections;
pub mod workflow;
