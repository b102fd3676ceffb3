pub mod analyze;
pub mod chains;
pub mod completion;
pub mod run;
