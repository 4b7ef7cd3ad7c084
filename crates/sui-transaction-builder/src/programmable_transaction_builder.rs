// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The mutable accumulator for programmable transactions. Inputs are
//! deduplicated by content, commands are append-only, and [`finish`] converts
//! the accumulator into an immutable [`ProgrammableTransaction`].
//!
//! [`finish`]: ProgrammableTransactionBuilder::finish

use indexmap::IndexMap;
use serde::Serialize;

use crate::base_types::{Identifier, ObjectID, ObjectRef, SuiAddress};
use crate::error::{BuilderError, BuilderResult};
use crate::transaction::{
    Argument, CallArg, Command, GasData, ObjectArg, ProgrammableMoveCall, ProgrammableTransaction,
};

#[cfg(test)]
#[path = "unit_tests/programmable_transaction_builder_tests.rs"]
mod programmable_transaction_builder_tests;

/// Dedup key for an input: object inputs are identified by object id, pure
/// inputs by their encoded bytes.
#[derive(PartialEq, Eq, Hash)]
enum BuilderArg {
    Object(ObjectID),
    Pure(Vec<u8>),
}

#[derive(Default)]
pub struct ProgrammableTransactionBuilder {
    inputs: IndexMap<BuilderArg, CallArg>,
    commands: Vec<Command>,
    gas_data: GasData,
}

impl ProgrammableTransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the accumulated inputs, commands, and gas configuration into
    /// an immutable transaction. Consumes the builder, so no mutation can be
    /// attempted once a build is finished.
    pub fn finish(self) -> ProgrammableTransaction {
        let Self {
            inputs,
            commands,
            gas_data,
        } = self;
        let inputs = inputs.into_values().collect();
        ProgrammableTransaction {
            inputs,
            commands,
            gas_data,
        }
    }

    /// The distinguished gas-coin pseudo-input, usable like any other input,
    /// e.g. as the source coin of a split.
    pub fn gas(&self) -> Argument {
        Argument::GasCoin
    }

    /// Register already-encoded bytes as a pure input. Equal byte strings
    /// share one input slot.
    pub fn pure_bytes(&mut self, bytes: Vec<u8>) -> Argument {
        let (i, _) = self
            .inputs
            .insert_full(BuilderArg::Pure(bytes.clone()), CallArg::Pure(bytes));
        Argument::Input(i as u16)
    }

    /// BCS-encode a value and register it as a pure input.
    pub fn pure<T: Serialize + ?Sized>(&mut self, value: &T) -> BuilderResult<Argument> {
        let bytes = bcs::to_bytes(value).map_err(|e| BuilderError::InvalidInput {
            error: format!("value is not serializable as a pure argument: {e}"),
        })?;
        Ok(self.pure_bytes(bytes))
    }

    /// Register an object input. Repeated registrations of the same object id
    /// must agree on the argument shape; two shared-object registrations with
    /// the same initial version unify, taking the mutable flag of either.
    pub fn obj(&mut self, obj_arg: ObjectArg) -> BuilderResult<Argument> {
        let id = obj_arg.id();
        let obj_arg = if let Some(old_value) = self.inputs.get(&BuilderArg::Object(id)) {
            let old_obj_arg = match old_value {
                CallArg::Pure(_) => fp_bail!(BuilderError::InvalidInput {
                    error: format!("invariant violation! object {id} has a pure argument"),
                }),
                CallArg::Object(arg) => arg,
            };
            match (old_obj_arg, obj_arg) {
                (
                    ObjectArg::SharedObject {
                        id: id1,
                        initial_shared_version: v1,
                        mutable: mut1,
                    },
                    ObjectArg::SharedObject {
                        id: id2,
                        initial_shared_version: v2,
                        mutable: mut2,
                    },
                ) if v1 == &v2 => {
                    fp_ensure!(
                        id == *id1 && id == id2,
                        BuilderError::InvalidInput {
                            error: format!("object id {id} does not match call arg"),
                        }
                    );
                    ObjectArg::SharedObject {
                        id,
                        initial_shared_version: v2,
                        mutable: *mut1 || mut2,
                    }
                }
                (old_obj_arg, obj_arg) => {
                    fp_ensure!(
                        old_obj_arg == &obj_arg,
                        BuilderError::InvalidInput {
                            error: format!(
                                "mismatched object argument kind for object {id}: {obj_arg:?} \
                                 is not compatible with {old_obj_arg:?}"
                            ),
                        }
                    );
                    obj_arg
                }
            }
        } else {
            obj_arg
        };
        let (i, _) = self
            .inputs
            .insert_full(BuilderArg::Object(id), CallArg::Object(obj_arg));
        Ok(Argument::Input(i as u16))
    }

    /// Register a call arg, dispatching on whether it is a pure value or an
    /// object.
    pub fn input(&mut self, call_arg: CallArg) -> BuilderResult<Argument> {
        match call_arg {
            CallArg::Pure(bytes) => Ok(self.pure_bytes(bytes)),
            CallArg::Object(obj) => self.obj(obj),
        }
    }

    /// Append a command and return a reference to its result, usable as an
    /// argument to any command added afterwards.
    pub fn command(&mut self, command: Command) -> BuilderResult<Argument> {
        self.validate_command(&command)?;
        let i = self.commands.len();
        self.commands.push(command);
        Ok(Argument::Result(i as u16))
    }

    /// Commands are validated for arity and for reference ordering: a result
    /// argument must name a command that already exists, an input argument an
    /// existing slot. Whether e.g. a coin argument actually names a coin is
    /// deferred to execution.
    fn validate_command(&self, command: &Command) -> BuilderResult {
        match command {
            Command::MergeCoins(_, coins) => fp_ensure!(
                !coins.is_empty(),
                BuilderError::InvalidInput {
                    error: "MergeCoins requires at least one coin to merge".to_string(),
                }
            ),
            Command::SplitCoins(_, amounts) => fp_ensure!(
                !amounts.is_empty(),
                BuilderError::InvalidInput {
                    error: "SplitCoins requires at least one amount".to_string(),
                }
            ),
            Command::TransferObjects(objects, _) => fp_ensure!(
                !objects.is_empty(),
                BuilderError::InvalidInput {
                    error: "TransferObjects requires at least one object".to_string(),
                }
            ),
            Command::Publish(modules) => fp_ensure!(
                !modules.is_empty(),
                BuilderError::InvalidInput {
                    error: "Publish requires at least one module".to_string(),
                }
            ),
            Command::MoveCall(_) => (),
        }
        for arg in command.arguments() {
            match arg {
                Argument::GasCoin => (),
                Argument::Input(i) => fp_ensure!(
                    (i as usize) < self.inputs.len(),
                    BuilderError::InvalidInput {
                        error: format!(
                            "input {i} is out of bounds ({} inputs registered)",
                            self.inputs.len()
                        ),
                    }
                ),
                Argument::Result(i) | Argument::NestedResult(i, _) => fp_ensure!(
                    (i as usize) < self.commands.len(),
                    BuilderError::InvalidInput {
                        error: format!(
                            "result {i} does not refer to an earlier command ({} added so far)",
                            self.commands.len()
                        ),
                    }
                ),
            }
        }
        Ok(())
    }

    /// Transfer already-registered arguments to `recipient`.
    pub fn transfer_args(
        &mut self,
        recipient: SuiAddress,
        args: Vec<Argument>,
    ) -> BuilderResult<Argument> {
        let rec_arg = self.pure(&recipient)?;
        self.command(Command::TransferObjects(args, rec_arg))
    }

    pub fn transfer_object(
        &mut self,
        recipient: SuiAddress,
        object_ref: ObjectRef,
    ) -> BuilderResult<Argument> {
        let obj_arg = self.obj(ObjectArg::ImmOrOwnedObject(object_ref))?;
        self.transfer_args(recipient, vec![obj_arg])
    }

    /// Split `amounts` off `coin`, returning one coin reference per amount.
    pub fn split_coins(
        &mut self,
        coin: Argument,
        amounts: Vec<Argument>,
    ) -> BuilderResult<Vec<Argument>> {
        let n = amounts.len() as u16;
        let Argument::Result(i) = self.command(Command::SplitCoins(coin, amounts))? else {
            unreachable!("self.command should always give a Argument::Result");
        };
        Ok(if n == 1 {
            vec![Argument::Result(i)]
        } else {
            (0..n).map(|j| Argument::NestedResult(i, j)).collect()
        })
    }

    /// Merge `coins` into `primary`. All coins are registered as owned-object
    /// inputs.
    pub fn merge_coins(
        &mut self,
        primary: ObjectRef,
        coins: Vec<ObjectRef>,
    ) -> BuilderResult<Argument> {
        let primary = self.obj(ObjectArg::ImmOrOwnedObject(primary))?;
        let coins = coins
            .into_iter()
            .map(|coin| self.obj(ObjectArg::ImmOrOwnedObject(coin)))
            .collect::<BuilderResult<Vec<_>>>()?;
        self.command(Command::MergeCoins(primary, coins))
    }

    /// Merge all `coins` into the first one and return an argument for it. A
    /// single coin is registered as an input without emitting a command.
    pub fn smash_coins(&mut self, coins: Vec<ObjectRef>) -> BuilderResult<Argument> {
        let mut coins = coins.into_iter();
        let Some(primary) = coins.next() else {
            fp_bail!(BuilderError::InvalidInput {
                error: "need at least one coin to smash".to_string(),
            });
        };
        let primary = self.obj(ObjectArg::ImmOrOwnedObject(primary))?;
        let to_merge = coins
            .map(|coin| self.obj(ObjectArg::ImmOrOwnedObject(coin)))
            .collect::<BuilderResult<Vec<_>>>()?;
        if !to_merge.is_empty() {
            self.command(Command::MergeCoins(primary, to_merge))?;
        }
        Ok(primary)
    }

    /// Call a Move function over unresolved call args, registering each as an
    /// input.
    pub fn move_call(
        &mut self,
        package: ObjectID,
        module: Identifier,
        function: Identifier,
        call_args: Vec<CallArg>,
    ) -> BuilderResult<Argument> {
        let arguments = call_args
            .into_iter()
            .map(|a| self.input(a))
            .collect::<BuilderResult<Vec<_>>>()?;
        self.programmable_move_call(package, module, function, arguments)
    }

    /// Call a Move function over already-registered arguments.
    pub fn programmable_move_call(
        &mut self,
        package: ObjectID,
        module: Identifier,
        function: Identifier,
        arguments: Vec<Argument>,
    ) -> BuilderResult<Argument> {
        self.command(Command::MoveCall(Box::new(ProgrammableMoveCall {
            package,
            module,
            function,
            arguments,
        })))
    }

    pub fn publish(&mut self, modules: Vec<Vec<u8>>) -> BuilderResult<Argument> {
        self.command(Command::Publish(modules))
    }

    /// Set the gas payment objects. Calling any of the gas setters again
    /// overwrites the previous value, supporting the default-then-override
    /// pattern used by adapters.
    pub fn set_gas_payment(&mut self, payment: Vec<ObjectRef>) {
        self.gas_data.payment = Some(payment);
    }

    pub fn set_gas_budget(&mut self, budget: u64) {
        self.gas_data.budget = Some(budget);
    }

    pub fn set_gas_price(&mut self, price: u64) {
        self.gas_data.price = Some(price);
    }
}
