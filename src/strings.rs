//! Localized-in-spirit string table. The original kept these in PROGMEM to
//! spare embedded RAM; on a desktop host that distinction doesn't matter,
//! but the text itself -- especially the HELP output -- is kept verbatim.

pub const CMD_LIST: &str = "list";
pub const CMD_RUN: &str = "run";
pub const CMD_QUIT: &str = "quit";
pub const CMD_SAVE: &str = "save";
pub const CMD_LOAD: &str = "load";
pub const CMD_INFO: &str = "info";
pub const CMD_NEW: &str = "new";
pub const CMD_HELP: &str = "help";
pub const CMD_CLEAR: &str = "clear";

pub const VERSION: &str = "PMBASIC version 0.1";

pub const HELP_LINES: &[&str] = &[
    "Lines beginning with a number are stored as program lines.",
    "New lines replace existing lines with the same number.",
    "Entering a number on its own deletes an existing line.",
    "Unnumbered lines are treated as commands or BASIC statements,",
    "and executed immediately.",
    "Commands:",
    "  NEW : clear the existing program",
    "  LIST [start] [count] : list the program",
    "  SAVE : save the program to EEPROM",
    "  LOAD : load a program from EEPROM",
    "  INFO : show memory sizes, etc",
    "  CLEAR : clear global variables",
];
