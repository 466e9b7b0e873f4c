pub mod cloud;
pub mod phenomenon;
pub mod raw_record;
pub mod report;
pub mod wind;
