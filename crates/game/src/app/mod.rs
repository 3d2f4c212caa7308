pub(crate) mod bootstrap;
pub(crate) mod catalog;
pub(crate) mod gameplay;
pub(crate) mod loop_runner;
pub(crate) mod shell;
pub(crate) mod stage;
