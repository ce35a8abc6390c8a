//! Consent-gated loading of third-party scripts.

use std::collections::BTreeMap;

use super::state::ConsentState;

/// Element id of the analytics loader script.
pub const GTM_SCRIPT_ID: &str = "gtm-script-loader";

/// A script element to add to the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub element_id: String,
    pub body: String,
}

/// The page the scripts are injected into.
pub trait ScriptHost {
    fn has_script(&self, element_id: &str) -> bool;
    fn inject_script(&mut self, script: Script);
}

/// Script host that records injected scripts in memory.
#[derive(Debug, Default)]
pub struct MemoryScriptHost {
    scripts: BTreeMap<String, Script>,
    injections: usize,
}

impl MemoryScriptHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of injections performed.
    pub fn injections(&self) -> usize {
        self.injections
    }

    pub fn script(&self, element_id: &str) -> Option<&Script> {
        self.scripts.get(element_id)
    }
}

impl ScriptHost for MemoryScriptHost {
    fn has_script(&self, element_id: &str) -> bool {
        self.scripts.contains_key(element_id)
    }

    fn inject_script(&mut self, script: Script) {
        self.injections += 1;
        self.scripts.insert(script.element_id.clone(), script);
    }
}

/// Google Tag Manager bootstrap for container `gtm_id`.
pub fn gtm_loader(gtm_id: &str) -> Script {
    let body = format!(
        "(function(w,d,s,l,i){{w[l]=w[l]||[];w[l].push({{'gtm.start':\
         new Date().getTime(),event:'gtm.js'}});var f=d.getElementsByTagName(s)[0],\
         j=d.createElement(s),dl=l!='dataLayer'?'&l='+l:'';j.async=true;j.src=\
         'https://www.googletagmanager.com/gtm.js?id='+i+dl;f.parentNode.insertBefore(j,f);\
         }})(window,document,'script','dataLayer','{gtm_id}');"
    );
    Script {
        element_id: GTM_SCRIPT_ID.to_string(),
        body,
    }
}

/// Load or withhold scripts according to `consent`.
///
/// The analytics loader is injected at most once per host no matter how
/// often this runs. Targeting and functional consent only log for now.
pub fn apply_consent<H>(consent: &ConsentState, host: &mut H, gtm_id: &str)
where
    H: ScriptHost + ?Sized,
{
    if consent.performance {
        if host.has_script(GTM_SCRIPT_ID) {
            tracing::debug!("analytics loader already present");
        } else {
            host.inject_script(gtm_loader(gtm_id));
            tracing::info!(gtm_id, "analytics loader injected");
        }
    } else {
        tracing::info!("performance consent not given; analytics will not load");
    }

    if consent.targeting {
        tracing::info!("targeting consent given; tracking pixels may load");
    } else {
        tracing::info!("targeting consent not given; tracking pixels will not load");
    }

    if consent.functional {
        tracing::info!("functional consent given; enhanced features enabled");
    } else {
        tracing::info!("functional consent not given; enhanced features disabled");
    }
}
