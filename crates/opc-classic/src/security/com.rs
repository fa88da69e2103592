//! COM process security (`CoInitializeSecurity`)

use windows::Win32::Security::PSECURITY_DESCRIPTOR;
use windows::Win32::System::Com::{
    CoInitializeEx, CoInitializeSecurity, COINIT_MULTITHREADED, EOAC_NONE, RPC_C_AUTHN_LEVEL,
    RPC_C_IMP_LEVEL,
};

use crate::error::{OpcError, Result};
use super::provider::{SecurityBlanket, SecurityProvider};

/// Configures DCOM security for the whole process
///
/// Joins the calling thread to the multithreaded apartment and then calls
/// `CoInitializeSecurity` with the default authentication services.
#[derive(Debug, Default)]
pub struct ComSecurityProvider;

impl ComSecurityProvider {
    pub fn new() -> Self {
        Self
    }
}

fn to_opc_error(call: &str, err: windows::core::Error) -> OpcError {
    OpcError::Security {
        hresult: err.code().0 as u32,
        message: format!("{}: {}", call, err.message()),
    }
}

impl SecurityProvider for ComSecurityProvider {
    fn name(&self) -> &'static str {
        "com"
    }

    fn initialize(&self, blanket: &SecurityBlanket) -> Result<()> {
        // S_FALSE (already initialized on this thread) is success
        unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) }
            .ok()
            .map_err(|e| to_opc_error("CoInitializeEx", e))?;

        unsafe {
            CoInitializeSecurity(
                PSECURITY_DESCRIPTOR::default(),
                -1,
                None,
                None,
                RPC_C_AUTHN_LEVEL(blanket.authentication.as_u32()),
                RPC_C_IMP_LEVEL(blanket.impersonation.as_u32()),
                None,
                EOAC_NONE,
                None,
            )
        }
        .map_err(|e| to_opc_error("CoInitializeSecurity", e))
    }
}
