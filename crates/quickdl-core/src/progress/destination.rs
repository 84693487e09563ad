//! Output sinks for progress frames.

use std::fs::File;
use std::io::{self, IsTerminal, Write};

/// A writer that can say whether it is attached to an attended terminal.
///
/// Queried once per tracker or adapter at construction. Sinks that cannot answer
/// keep the default and count as non-interactive.
pub trait Destination: Write {
    fn is_interactive(&self) -> bool {
        false
    }
}

impl Destination for io::Stderr {
    fn is_interactive(&self) -> bool {
        self.is_terminal()
    }
}

impl Destination for io::Stdout {
    fn is_interactive(&self) -> bool {
        self.is_terminal()
    }
}

impl Destination for File {
    fn is_interactive(&self) -> bool {
        self.is_terminal()
    }
}

impl Destination for Vec<u8> {}

impl Destination for io::Sink {}

impl<D: Destination + ?Sized> Destination for &mut D {
    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }
}

impl<D: Destination + ?Sized> Destination for Box<D> {
    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }
}
