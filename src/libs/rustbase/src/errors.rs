/*
 * Copyright (C) 2018, Nils Asmussen <nils@os.inf.tu-dresden.de>
 * Economic rights: Technische Universitaet Dresden (Germany)
 *
 * This file is part of M3 (Microkernel-based SysteM for Heterogeneous Manycores).
 *
 * M3 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License version 2 as
 * published by the Free Software Foundation.
 *
 * M3 is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
 * General Public License version 2 for more details.
 */

//! Contains the error handling types

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error;
use std::fmt;

/// The error codes
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Code {
    // DTU errors
    InvTier = 1,
    StalledTransfer,
    Abort,
    // SW Errors
    InvArgs,
    NoPerm,
    NoSpace,
    InvalidGeometry,
    InvalidRecord,
}

impl Code {
    /// Returns a short name for the code as it appears in reports
    pub fn name(self) -> &'static str {
        match self {
            Code::InvTier           => "InvTier",
            Code::StalledTransfer   => "StalledTransfer",
            Code::Abort             => "Abort",
            Code::InvArgs           => "InvArgs",
            Code::NoPerm            => "NoPerm",
            Code::NoSpace           => "NoSpace",
            Code::InvalidGeometry   => "InvalidGeometry",
            Code::InvalidRecord     => "InvalidRecord",
        }
    }

    /// Returns true if no caller can recover from this error
    ///
    /// A stalled transfer cannot be abandoned without the cooperation of the engine, so everything
    /// that is still in flight has to be considered lost.
    pub fn is_fatal(self) -> bool {
        self == Code::StalledTransfer
    }
}

impl From<u32> for Code {
    fn from(error: u32) -> Self {
        match error {
            1 => Code::InvTier,
            2 => Code::StalledTransfer,
            3 => Code::Abort,
            4 => Code::InvArgs,
            5 => Code::NoPerm,
            6 => Code::NoSpace,
            7 => Code::InvalidGeometry,
            8 => Code::InvalidRecord,
            _ => Code::Abort,
        }
    }
}

/// The struct that stores information about an occurred error
pub struct ErrorInfo {
    code: Code,
    msg: Option<String>,
    bt: Backtrace,
}

impl ErrorInfo {
    /// Creates a new object for given error code
    ///
    /// Note that this gathers and stores the backtrace (if enabled via `RUST_BACKTRACE`)
    #[inline(never)]
    pub fn new(code: Code) -> Self {
        ErrorInfo {
            code: code,
            msg: None,
            bt: Backtrace::capture(),
        }
    }
}

/// The error struct that is passed around
pub struct Error {
    info: Box<ErrorInfo>,
}

impl Error {
    /// Creates a new object for given error code
    ///
    /// Note that this gathers and stores the backtrace
    pub fn new(code: Code) -> Self {
        Error {
            info: Box::new(ErrorInfo::new(code)),
        }
    }

    /// Creates a new object for given error code with a message that describes the context
    pub fn new_msg<S: Into<String>>(code: Code, msg: S) -> Self {
        let mut err = Self::new(code);
        err.info.msg = Some(msg.into());
        err
    }

    /// Returns the error code
    pub fn code(&self) -> Code {
        self.info.code
    }
    /// Returns the context message, if any
    pub fn msg(&self) -> Option<&str> {
        self.info.msg.as_ref().map(|m| m.as_str())
    }
    /// Returns the backtrace to the location where the error occurred
    pub fn backtrace(&self) -> &Backtrace {
        &self.info.bt
    }

    fn debug(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.code())?;
        if let Some(m) = self.msg() {
            write!(f, " ({})", m)?;
        }
        if self.info.bt.status() == BacktraceStatus::Captured {
            write!(f, " at:\n{}", self.info.bt)?;
        }
        Ok(())
    }
}

impl From<Code> for Error {
    fn from(code: Code) -> Self {
        Self::new(code)
    }
}

impl From<u32> for Error {
    fn from(error: u32) -> Self {
        Self::new(Code::from(error))
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        self.code() == other.code()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.debug(f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code().name())?;
        if let Some(m) = self.msg() {
            write!(f, ": {}", m)?;
        }
        Ok(())
    }
}

impl error::Error for Error {
}
