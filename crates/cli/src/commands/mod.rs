pub mod normalize;
pub mod run;
