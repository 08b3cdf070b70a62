//! Language constants shared by the parser, the classifier and the scope walker.

/// File extension of source files picked up during project enumeration.
pub const PHP_EXT: &str = "php";

/// Variable sigil.
pub const SIGIL: char = '$';

/// Reserved current-instance variable including the member-access operator.
pub const SELF_REFERENCE: &str = "$this->";

/// Member-access operator.
pub const MEMBER_ACCESS: &str = "->";

/// Instantiation keyword.
pub const NEW_KEYWORD: &str = "new";

/// Characters that terminate the token typed before the cursor.
pub const TOKEN_DELIMITERS: &[char] = &['(', ',', '.'];

/// Predefined environment variables offered in every bare-variable context.
///
/// Superglobals plus the argument-vector and argument-count names.
pub const PREDEFINED_VARIABLES: &[&str] = &[
    "this",
    "GLOBALS",
    "_GET",
    "_POST",
    "_FILES",
    "_SESSION",
    "_COOKIE",
    "_SERVER",
    "_REQUEST",
    "_ENV",
    "php_errormsg",
    "HTTP_RAW_POST_DATA",
    "http_response_header",
    "argc",
    "argv",
];
