//! Schema for the admin profile form on the settings page.

use crate::rule::Rule;
use crate::schema::Schema;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Profile updates are partial: only submitted fields are checked.
pub fn profile_schema() -> Schema {
    Schema::new()
        .field(
            "name",
            Rule::string()
                .min_len(2)
                .message("Name must be at least 2 characters")
                .optional(),
        )
        .field(
            "email",
            Rule::string()
                .pattern(EMAIL.clone())
                .message("Enter a valid email address")
                .optional(),
        )
        .field(
            "phone",
            Rule::string()
                .non_empty()
                .message("Phone number cannot be blank")
                .optional(),
        )
        .field("avatar", Rule::string().optional())
}
