use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} contract not provided")]
    MissingContract(&'static str),
    #[error("Failed to fetch strategy contract: {0}")]
    FetchStrategyContract(#[source] Box<Error>),
    #[error("Failed to fetch token contract: {0}")]
    FetchTokenContract(#[source] Box<Error>),
    #[error("Alloy contract error {0}")]
    AlloyContractError(#[from] alloy_contract::Error),
    #[error("Call cancelled")]
    Cancelled,
    #[error("Call deadline exceeded")]
    DeadlineExceeded,
}

impl Error {
    /// Wrap a failure to construct a strategy handle.
    pub(crate) fn fetch_strategy(cause: Error) -> Self {
        Error::FetchStrategyContract(Box::new(cause))
    }

    /// Wrap a failure to resolve or construct a token handle.
    pub(crate) fn fetch_token(cause: Error) -> Self {
        Error::FetchTokenContract(Box::new(cause))
    }

    /// Whether the failure came from the caller's [`CallContext`](crate::context::CallContext)
    /// rather than from the chain.
    #[must_use]
    pub fn is_context_error(&self) -> bool {
        match self {
            Error::Cancelled | Error::DeadlineExceeded => true,
            Error::FetchStrategyContract(cause) | Error::FetchTokenContract(cause) => {
                cause.is_context_error()
            }
            _ => false,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
