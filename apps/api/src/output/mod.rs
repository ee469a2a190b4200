// Output Actions
// Implements: read, copy-to-clipboard and document export of the current letter.

pub mod handlers;
