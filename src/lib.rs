pub mod error;

pub mod config {
    pub mod config;
    pub mod installation;
    pub mod ports;
}

pub mod models {
    pub mod command;
    pub mod conversion;
    pub mod parse;
    pub mod tool;
}

pub mod service {
    pub mod config_service;
    pub mod process;
    pub mod scrape;
    #[cfg(test)]
    pub(crate) mod testing;
    pub mod traits {
        pub mod i_service;
    }
}

pub mod facade {
    pub mod converter_facade;
    pub mod parser_facade;
    pub mod traits {
        pub mod i_facade;
    }
}

pub mod action {
    pub mod cli;
    pub mod interactive;
}

pub mod utils {
    pub mod file;
    pub mod utils;
}

pub use error::{DearOmgError, Result};
pub use facade::converter_facade::{convert_to_omg, ConverterFacade};
pub use facade::parser_facade::{parse_omg, ParserFacade};
pub use facade::traits::i_facade::{ConverterFacadeTrait, ParserFacadeTrait};
