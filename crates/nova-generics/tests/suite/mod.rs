mod logging;
mod lookup;
mod resolution;
mod signatures;
mod type_match;
