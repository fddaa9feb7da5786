//! Built-in rule catalog.

use crate::types::{HookTiming, ParamDef, ParamKind, RuleDef};

/// Rule identity: value must be one of an allowed set.
pub const ONE_OF: &str = "one_of";
/// Rule identity: value must be a canonically formatted UUID.
pub const UUID: &str = "uuid";
/// Rule identity: value must be an ISO 3166-1 alpha-2 country code.
pub const COUNTRY_CODE: &str = "country_code";
/// Rule identity: an instance method checked on every validation pass.
pub const METHOD_VALIDATION: &str = "method_validation";
/// Rule identity: an instance method checked once after construction.
pub const POST_CONSTRUCT_VALIDATION: &str = "post_construct_validation";

/// The rules every registry starts with.
pub fn builtin_rules() -> Vec<RuleDef> {
    vec![
        RuleDef::new(ONE_OF)
            .with_message("value {validatedValue} is not one of {values}")
            .repeatable()
            .param(ParamDef::new("values", ParamKind::TextList)),
        RuleDef::new(UUID)
            .with_message("{validatedValue} is not a valid UUID")
            .repeatable(),
        RuleDef::new(COUNTRY_CODE)
            .with_message("{validatedValue} is not a valid ISO 3166-1 alpha-2 country code")
            .repeatable(),
        RuleDef::new(METHOD_VALIDATION)
            .hook(HookTiming::EveryValidation)
            .param(ParamDef::new("fields", ParamKind::FieldList).optional()),
        RuleDef::new(POST_CONSTRUCT_VALIDATION)
            .hook(HookTiming::PostConstruct)
            .param(ParamDef::new("fields", ParamKind::FieldList).optional()),
    ]
}
