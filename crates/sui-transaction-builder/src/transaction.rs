// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display, Formatter};
use std::iter::once;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::Bytes;

use crate::base_types::{Identifier, ObjectID, ObjectRef, SequenceNumber};

/// An argument to a programmable transaction command.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Debug, Serialize, Deserialize)]
pub enum Argument {
    /// The gas coin, usable like any other input.
    GasCoin,
    /// One of the input objects or pure values, by input index.
    Input(u16),
    /// The result of another command, by command index. Only addresses the
    /// whole result, so it is meaningful for commands producing exactly one
    /// value.
    Result(u16),
    /// Like a `Result` but accesses a nested result: the j-th value produced
    /// by the i-th command, e.g. one coin out of a multi-amount split.
    NestedResult(u16, u16),
}

/// How an object input is used by the transaction.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Debug, Serialize, Deserialize)]
pub enum ObjectArg {
    /// A Move object, either immutable, or owned mutable.
    ImmOrOwnedObject(ObjectRef),
    /// A Move object that's shared. `mutable` controls whether commands ask
    /// for a mutable reference to the object.
    SharedObject {
        id: ObjectID,
        initial_shared_version: SequenceNumber,
        mutable: bool,
    },
    /// A Move object that can be received in this transaction.
    Receiving(ObjectRef),
}

impl ObjectArg {
    pub fn id(&self) -> ObjectID {
        match self {
            ObjectArg::ImmOrOwnedObject((id, _, _)) | ObjectArg::Receiving((id, _, _)) => *id,
            ObjectArg::SharedObject { id, .. } => *id,
        }
    }
}

/// An input to the transaction: an object reference resolved externally, or
/// the BCS bytes of a value known at build time.
#[serde_as]
#[derive(Eq, PartialEq, Clone, Hash, Debug, Serialize, Deserialize)]
pub enum CallArg {
    /// Contains no structs or objects.
    Pure(#[serde_as(as = "Bytes")] Vec<u8>),
    /// An object.
    Object(ObjectArg),
}

/// The command for calling a Move function.
#[derive(Eq, PartialEq, Clone, Hash, Debug, Serialize, Deserialize)]
pub struct ProgrammableMoveCall {
    /// The package containing the module and function.
    pub package: ObjectID,
    /// The specific module in the package containing the function.
    pub module: Identifier,
    /// The function to be called.
    pub function: Identifier,
    /// The arguments to the function.
    pub arguments: Vec<Argument>,
}

/// A single command in a programmable transaction.
#[serde_as]
#[derive(Eq, PartialEq, Clone, Hash, Debug, Serialize, Deserialize)]
pub enum Command {
    /// A call to either an entry or a public Move function.
    MoveCall(Box<ProgrammableMoveCall>),
    /// Sends n objects to the specified address.
    TransferObjects(Vec<Argument>, Argument),
    /// Splits off the given amounts into new coins, one per amount.
    SplitCoins(Argument, Vec<Argument>),
    /// Merges the given coins into the first coin.
    MergeCoins(Argument, Vec<Argument>),
    /// Publishes a Move package.
    Publish(#[serde_as(as = "Vec<Bytes>")] Vec<Vec<u8>>),
}

impl Command {
    /// Every argument referenced by the command, in declaration order.
    pub fn arguments(&self) -> Vec<Argument> {
        match self {
            Command::MoveCall(call) => call.arguments.clone(),
            Command::TransferObjects(objects, address) => {
                objects.iter().copied().chain(once(*address)).collect()
            }
            Command::SplitCoins(coin, amounts) => {
                once(*coin).chain(amounts.iter().copied()).collect()
            }
            Command::MergeCoins(primary, coins) => {
                once(*primary).chain(coins.iter().copied()).collect()
            }
            Command::Publish(_) => vec![],
        }
    }
}

/// Gas configuration recorded at build time. Fields left unset are resolved
/// externally at execution time.
#[derive(Eq, PartialEq, Clone, Hash, Debug, Default, Serialize, Deserialize)]
pub struct GasData {
    pub payment: Option<Vec<ObjectRef>>,
    pub budget: Option<u64>,
    pub price: Option<u64>,
}

/// A series of commands where the results of one command can be used in
/// future commands, over a shared pool of deduplicated inputs.
#[derive(Eq, PartialEq, Clone, Hash, Debug, Serialize, Deserialize)]
pub struct ProgrammableTransaction {
    /// Input objects or pure values, in creation order.
    pub inputs: Vec<CallArg>,
    /// The commands to be executed sequentially. A failure in any command
    /// results in the failure of the entire transaction.
    pub commands: Vec<Command>,
    /// Gas payment, budget, and price recorded at build time.
    pub gas_data: GasData,
}

impl Display for Argument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Argument::GasCoin => write!(f, "GasCoin"),
            Argument::Input(i) => write!(f, "Input({i})"),
            Argument::Result(i) => write!(f, "Result({i})"),
            Argument::NestedResult(i, j) => write!(f, "NestedResult({i},{j})"),
        }
    }
}

impl Display for ProgrammableMoveCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let ProgrammableMoveCall {
            package,
            module,
            function,
            arguments,
        } = self;
        write!(
            f,
            "{package}::{module}::{function}({})",
            arguments.iter().join(",")
        )
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Command::MoveCall(call) => Display::fmt(call, f),
            Command::TransferObjects(objects, address) => {
                write!(f, "TransferObjects([{}],{address})", objects.iter().join(","))
            }
            Command::SplitCoins(coin, amounts) => {
                write!(f, "SplitCoins({coin},[{}])", amounts.iter().join(","))
            }
            Command::MergeCoins(primary, coins) => {
                write!(f, "MergeCoins({primary},[{}])", coins.iter().join(","))
            }
            Command::Publish(modules) => write!(f, "Publish(<{} modules>)", modules.len()),
        }
    }
}

impl Display for ProgrammableTransaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let ProgrammableTransaction {
            inputs,
            commands,
            gas_data,
        } = self;
        writeln!(f, "Inputs: {inputs:?}")?;
        writeln!(f, "Commands: [")?;
        for command in commands {
            writeln!(f, "  {command},")?;
        }
        writeln!(f, "]")?;
        write!(f, "Gas: {gas_data:?}")
    }
}
