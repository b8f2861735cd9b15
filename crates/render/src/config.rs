/// Shadow map filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowFilter {
    /// Single depth comparison per fragment.
    Hard,
    /// Percentage-closer filtering over a 3x3 texel neighbourhood.
    #[default]
    PcfSoft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowMapConfig {
    pub enabled: bool,
    pub filter: ShadowFilter,
}

impl Default for ShadowMapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filter: ShadowFilter::PcfSoft,
        }
    }
}

/// Fixed renderer settings; not changed after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererConfig {
    /// Multisample the main pass.
    pub antialias: bool,
    pub shadow_map: ShadowMapConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            shadow_map: ShadowMapConfig::default(),
        }
    }
}

impl RendererConfig {
    /// Sample count of the main color and depth targets.
    pub fn sample_count(&self) -> u32 {
        if self.antialias { 4 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_setup() {
        let config = RendererConfig::default();
        assert!(config.antialias);
        assert!(config.shadow_map.enabled);
        assert_eq!(config.shadow_map.filter, ShadowFilter::PcfSoft);
        assert_eq!(config.sample_count(), 4);
    }

    #[test]
    fn aliased_output_is_single_sampled() {
        let config = RendererConfig {
            antialias: false,
            ..RendererConfig::default()
        };
        assert_eq!(config.sample_count(), 1);
    }
}
