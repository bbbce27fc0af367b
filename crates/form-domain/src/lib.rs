// form-domain library entry point
pub mod documents;
pub mod error;
pub mod field;
pub mod input;
pub mod masks;
pub mod money;
pub use documents::{Cnpj, Cpf};
pub use error::DomainError;
pub use field::{FieldDefinition, FieldOption, FieldType};
pub use input::{apply_mask, FormatIssue, MaskSettings, MaskedInput};
pub use money::MoneyLimits;
