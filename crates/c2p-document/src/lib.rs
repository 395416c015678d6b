pub mod compile;
pub mod template;

pub use compile::{generate_pdf, write_tex, DocumentCompiler, PdfRequest, XelatexCompiler};
pub use template::{Template, DEFAULT_TEMPLATE};
