//! The invoice skeleton shared by every theme.
//!
//! Both templates are embedded at compile time from `templates/`:
//!
//! - [`DOCUMENT_TEMPLATE`]: the HTML structure. Slots: `$STYLE_NAME`,
//!   `$STYLE_CSS`, `$SLUG`. Invoice fields are `{{FieldName}}` tokens and the
//!   line-item extension point is `{{ExtrasRows}}`; both are left untouched.
//! - [`STYLESHEET_TEMPLATE`]: the base CSS. One slot per palette token plus
//!   the trailing `$extra_css` slot where style overrides are appended.

/// Name under which the stylesheet template is registered.
pub const STYLESHEET: &str = "stylesheet";

/// Name under which the document template is registered.
pub const DOCUMENT: &str = "document";

/// Base HTML document.
pub const DOCUMENT_TEMPLATE: &str = include_str!("../../templates/invoice.html");

/// Base CSS stylesheet.
pub const STYLESHEET_TEMPLATE: &str = include_str!("../../templates/invoice.css");

/// Stylesheet slot receiving the style-specific rules.
pub const EXTRA_CSS_SLOT: &str = "extra_css";

/// Document slot receiving the theme display name.
pub const STYLE_NAME_SLOT: &str = "STYLE_NAME";

/// Document slot receiving the rendered stylesheet.
pub const STYLE_CSS_SLOT: &str = "STYLE_CSS";

/// Document slot receiving the theme slug (`body.theme-$SLUG`).
pub const SLUG_SLOT: &str = "SLUG";

/// Placeholder for the repeated invoice line rows.
pub const EXTRAS_ROWS_PLACEHOLDER: &str = "{{ExtrasRows}}";

/// Invoice field placeholders present in [`DOCUMENT_TEMPLATE`].
///
/// The generator never fills these; they are listed so callers and tests can
/// check that a document still carries all of them.
pub const INVOICE_PLACEHOLDERS: &[&str] = &[
    "{{AdditionalNumber}}",
    "{{BankBIC}}",
    "{{BankIBAN}}",
    "{{BankName}}",
    "{{BaseLineTotal}}",
    "{{BaseQuantity}}",
    "{{ChargeRate}}",
    "{{ClientAddress}}",
    "{{ClientName}}",
    "{{ClientVAT}}",
    "{{CompanyAddress}}",
    "{{CompanyEmail}}",
    "{{CompanyName}}",
    "{{CompanyPhone}}",
    "{{CompanyShort}}",
    "{{CompanyVAT}}",
    "{{ConsultantName}}",
    "{{ContactEmail}}",
    "{{ContactName}}",
    "{{ContractID}}",
    "{{CostCenter}}",
    "{{Currency}}",
    "{{DueDate}}",
    "{{EndCustomer}}",
    EXTRAS_ROWS_PLACEHOLDER,
    "{{InvoiceDate}}",
    "{{InvoiceNumber}}",
    "{{Mission}}",
    "{{Notes}}",
    "{{PONumber}}",
    "{{PaymentTerms}}",
    "{{PeriodEnd}}",
    "{{PeriodStart}}",
    "{{RateUnit}}",
    "{{Reference}}",
    "{{ResourceName}}",
    "{{ReverseChargeNote}}",
    "{{StructuredReference}}",
    "{{Subtotal}}",
    "{{Total}}",
    "{{VATAmount}}",
    "{{VATRate}}",
];
