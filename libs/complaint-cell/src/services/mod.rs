pub mod complaint;

pub use complaint::ComplaintService;
