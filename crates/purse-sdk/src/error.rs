use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("expected {0} to be provided")]
    MissingDependency(&'static str),

    #[error("style registry is already in use by an outer call")]
    RegistryBusy,

    #[error("style compiler is already in use by an outer call")]
    CompilerBusy,

    #[error("compile error: {0}")]
    Compile(#[from] purse_compiler::CompileError),

    #[error("registry error: {0}")]
    Registry(#[from] purse_registry::RegistryError),
}

pub type SdkResult<T> = Result<T, SdkError>;
