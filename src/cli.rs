//! Command-line interface

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::criteria::{Condition, Criteria};

#[derive(Parser)]
#[command(name = "bpdesk")]
#[command(about = "Business partner desk: choose and edit customers, groups and contacts")]
pub struct Cli {
    /// Path to the SQLite database (overrides BPDESK_DB_PATH)
    #[arg(long, global = true)]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose customers matching the given filters
    Customers {
        /// Filters as field=value, field!=value or field~value
        filter: Vec<String>,
    },
    /// Edit a customer, or start a new one when no code is given
    EditCustomer {
        /// Code of the customer to edit
        code: Option<String>,
    },
    /// Choose business-partner groups matching the given filters
    Groups {
        /// Filters as field=value, field!=value or field~value
        filter: Vec<String>,
    },
    /// Edit a business-partner group, or start a new one
    EditGroup {
        /// Code of the group to edit
        code: Option<String>,
    },
    /// Choose contact persons matching the given filters
    Contacts {
        /// Filters as field=value, field!=value or field~value
        filter: Vec<String>,
    },
    /// List the registered applications
    Apps,
}

/// Parse CLI filter arguments into query criteria
pub fn parse_criteria(filters: &[String]) -> Result<Criteria> {
    let mut criteria = Criteria::new();
    for filter in filters {
        criteria = criteria.with(Condition::parse(filter)?);
    }
    Ok(criteria)
}
