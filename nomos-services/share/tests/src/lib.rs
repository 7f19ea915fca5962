// Collaborators are mocked in `common`, the store backed getter runs against a
// temporary directory.

#[cfg(test)]
mod common;

#[cfg(test)]
mod api_integration;

#[cfg(test)]
mod cancellation;

#[cfg(test)]
mod namespace_integration;
