//! Flutter bridge surface for the GraceCHMS shell.

pub mod api;
