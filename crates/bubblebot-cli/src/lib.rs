use clap::ValueEnum;

pub mod analysis;
pub mod bot;
pub mod cli;
pub mod commands;
pub mod config;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}
