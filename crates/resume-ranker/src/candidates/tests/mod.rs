mod common;
mod export;
mod extraction;
