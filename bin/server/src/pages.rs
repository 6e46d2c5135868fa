//! Page components for the application.
//!
//! Each page is a Leptos component that renders a specific route,
//! along with any server functions specific to that page.

pub mod apply_loan;
pub mod home;
pub mod login;
pub mod pay_emi;
pub mod upload_documents;

pub use apply_loan::ApplyLoanPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use pay_emi::PayEmiPage;
pub use upload_documents::UploadDocumentsPage;
