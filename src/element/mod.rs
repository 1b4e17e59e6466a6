pub mod element;
pub mod elements;
pub mod rect;
