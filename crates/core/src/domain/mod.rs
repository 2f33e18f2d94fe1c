pub mod questionnaire;
pub mod venue;
