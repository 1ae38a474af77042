mod config;
mod files;
mod scan;
