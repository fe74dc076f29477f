//! Command-line parsing for the operator binary.
//!
//! One command per invocation:
//!
//! ```text
//! settlement-engine list
//! settlement-engine create <name> [description]
//! settlement-engine show <settlement>
//! settlement-engine saldo <settlement>
//! settlement-engine add-resource <settlement> <kind> <name> <amount>
//! settlement-engine add-tool <settlement> <name> <amount>
//! settlement-engine blueprints
//! settlement-engine register-blueprint <blueprint.json>
//! settlement-engine build <settlement> <blueprint name>
//! settlement-engine advance <settlement> <days>
//! settlement-engine yield <settlement>
//! ```

use settlement_types::{ResourceKind, SettlementId};

use crate::error::EngineError;

/// Help text printed for usage errors.
pub const USAGE: &str = "commands: list | create <name> [description] | show <id> | saldo <id> \
| add-resource <id> <kind> <name> <amount> | add-tool <id> <name> <amount> | blueprints \
| register-blueprint <file.json> | build <id> <blueprint> | advance <id> <days> | yield <id>";

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all settlements.
    List,
    /// Found a settlement.
    Create {
        /// Display name.
        name: String,
        /// Free-text description.
        description: String,
    },
    /// Print one settlement with its spears as JSON.
    Show(SettlementId),
    /// Print the settlement's saldo.
    Saldo(SettlementId),
    /// File a material in the ledger.
    AddResource {
        /// Target settlement.
        settlement: SettlementId,
        /// Resource kind.
        kind: ResourceKind,
        /// Display name.
        name: String,
        /// Quantity.
        amount: i64,
    },
    /// File a tool in the ledger.
    AddTool {
        /// Target settlement.
        settlement: SettlementId,
        /// Tool name.
        name: String,
        /// Quantity.
        amount: i64,
    },
    /// List the blueprint catalog.
    Blueprints,
    /// Register the blueprint stored as JSON in a file.
    RegisterBlueprint {
        /// Path to the JSON file.
        path: String,
    },
    /// Build a blueprint by name.
    Build {
        /// Target settlement.
        settlement: SettlementId,
        /// Blueprint name, case-insensitive.
        blueprint: String,
    },
    /// Advance production by some days.
    Advance {
        /// Target settlement.
        settlement: SettlementId,
        /// Number of days.
        days: i64,
    },
    /// Print the settlement's combined spear yield.
    Yield(SettlementId),
}

impl Command {
    /// Parse the arguments following the program name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Usage`] for unknown commands, missing
    /// arguments or values that do not parse.
    pub fn parse(args: &[String]) -> Result<Self, EngineError> {
        let mut args = args.iter().map(String::as_str);
        let name = args.next().ok_or_else(|| EngineError::usage(USAGE))?;
        let rest: Vec<&str> = args.collect();

        match (name, rest.as_slice()) {
            ("list", []) => Ok(Self::List),
            ("create", [name]) => Ok(Self::Create {
                name: (*name).to_owned(),
                description: String::new(),
            }),
            ("create", [name, description @ ..]) => Ok(Self::Create {
                name: (*name).to_owned(),
                description: description.join(" "),
            }),
            ("show", [id]) => Ok(Self::Show(settlement_id(id)?)),
            ("saldo", [id]) => Ok(Self::Saldo(settlement_id(id)?)),
            ("add-resource", [id, kind, name, amount]) => Ok(Self::AddResource {
                settlement: settlement_id(id)?,
                kind: resource_kind(kind)?,
                name: (*name).to_owned(),
                amount: number(amount, "amount")?,
            }),
            ("add-tool", [id, name, amount]) => Ok(Self::AddTool {
                settlement: settlement_id(id)?,
                name: (*name).to_owned(),
                amount: number(amount, "amount")?,
            }),
            ("blueprints", []) => Ok(Self::Blueprints),
            ("register-blueprint", [path]) => Ok(Self::RegisterBlueprint {
                path: (*path).to_owned(),
            }),
            ("build", [id, blueprint @ ..]) if !blueprint.is_empty() => Ok(Self::Build {
                settlement: settlement_id(id)?,
                blueprint: blueprint.join(" "),
            }),
            ("advance", [id, days]) => Ok(Self::Advance {
                settlement: settlement_id(id)?,
                days: number(days, "days")?,
            }),
            ("yield", [id]) => Ok(Self::Yield(settlement_id(id)?)),
            _ => Err(EngineError::usage(USAGE)),
        }
    }
}

fn settlement_id(raw: &str) -> Result<SettlementId, EngineError> {
    raw.parse::<u32>()
        .map(SettlementId::new)
        .map_err(|e| EngineError::usage(format!("invalid settlement id {raw:?}: {e}")))
}

fn number(raw: &str, what: &str) -> Result<i64, EngineError> {
    raw.parse::<i64>()
        .map_err(|e| EngineError::usage(format!("invalid {what} {raw:?}: {e}")))
}

fn resource_kind(raw: &str) -> Result<ResourceKind, EngineError> {
    ResourceKind::ALL
        .into_iter()
        .find(|k| k.as_str().eq_ignore_ascii_case(raw))
        .ok_or_else(|| EngineError::usage(format!("unknown resource kind {raw:?}")))
}
