//! Register VM error taxonomy.

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmError {
    None,
    Exit,
    EndOfMem,
    IllegalInst,
}

impl Display for VmError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VmError::None => "VM_ERR_NONE",
            VmError::Exit => "VM_ERR_EXIT",
            VmError::EndOfMem => "VM_ERR_END_OF_MEM",
            VmError::IllegalInst => "VM_ERR_ILLEGAL_INST",
        };
        write!(f, "{}", s)
    }
}
