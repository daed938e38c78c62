// This file is required to make `cargo test` discover tests in subdirectories.

#[cfg(test)]
mod common;

#[cfg(test)]
mod delta;

#[cfg(test)]
mod html;


#[cfg(test)]
mod sem;
