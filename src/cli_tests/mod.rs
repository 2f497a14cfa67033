mod apply;
mod cli;
