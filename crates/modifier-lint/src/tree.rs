use crate::source::{ContractDefinition, FunctionDefinition, SourceUnit};

/// A function together with the contract that declares it.
#[derive(Debug, Clone, Copy)]
pub struct FunctionRef<'unit> {
    pub contract: &'unit ContractDefinition,
    pub function: &'unit FunctionDefinition,
}

/// Collect all functions in declaration order.
pub fn collect_functions(unit: &SourceUnit) -> Vec<FunctionRef<'_>> {
    let mut functions = Vec::new();
    walk_functions(unit, &mut functions, |vec, function| vec.push(function));
    functions
}

fn walk_functions<'unit, T>(
    unit: &'unit SourceUnit,
    state: &mut T,
    mut visit: impl FnMut(&mut T, FunctionRef<'unit>),
) {
    for contract in &unit.contracts {
        for function in &contract.functions {
            visit(state, FunctionRef { contract, function });
        }
    }
}
