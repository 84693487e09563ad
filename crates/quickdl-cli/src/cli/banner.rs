//! Startup banner.

const BANNER: &str = "\
---------------------------------------------------------------------
|                                                                   |
|                       Welcome to QuickDL!                         |
|                 QuickDL is a Download Accelerator                 |
|                                                                   |
---------------------------------------------------------------------";

pub(super) fn print_banner() {
    println!("{BANNER}");
}
