mod advanced;
mod factory;
mod prefix_index;
mod prefix_search;
mod search_vault;

pub use advanced::{
    AdvancedSearch, Criterion, CriterionFailure, SearchError, SearchOperator, SearchRequest,
};
pub use factory::create_search_vault;
pub use prefix_index::PrefixIndex;
pub use prefix_search::PrefixSearchVault;
pub use search_vault::*;
