mod config;
mod dispatch;
mod fixtures;
