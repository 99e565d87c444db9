// Module naming follows project convention (Core = collaborators, Harness = benchmark pipeline)
#[allow(non_snake_case)]
pub mod Core;

#[allow(non_snake_case)]
pub mod Harness;

#[allow(non_snake_case)]
pub mod Debug {
    pub mod StructDebug;
}

pub mod logging;
