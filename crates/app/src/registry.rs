//! Backend registry: maps each device platform to exactly one factory.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use appdriver_domain::configuration::AutomationConfiguration;
use appdriver_domain::error::DriverError;
use appdriver_domain::platform::Platform;

use crate::ports::Backend;

/// Builds a backend from a configuration snapshot.
pub type BackendFactory =
    Arc<dyn Fn(&AutomationConfiguration) -> Result<Box<dyn Backend>, DriverError> + Send + Sync>;

/// Lookup table from [`Platform`] to [`BackendFactory`].
///
/// Populated once by the composition root. Several platforms may share one
/// factory, but a platform can never be claimed twice.
#[derive(Clone, Default)]
pub struct BackendRegistry {
    factories: HashMap<Platform, BackendFactory>,
}

impl BackendRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` for every platform in `platforms`.
    ///
    /// Either all platforms are registered or none are.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::DuplicateBackend`] when a platform is already
    /// registered or listed twice.
    pub fn register<F>(&mut self, platforms: &[Platform], factory: F) -> Result<(), DriverError>
    where
        F: Fn(&AutomationConfiguration) -> Result<Box<dyn Backend>, DriverError>
            + Send
            + Sync
            + 'static,
    {
        for (index, platform) in platforms.iter().enumerate() {
            if self.factories.contains_key(platform) || platforms[..index].contains(platform) {
                return Err(DriverError::DuplicateBackend(*platform));
            }
        }

        let factory: BackendFactory = Arc::new(factory);
        for platform in platforms {
            self.factories.insert(*platform, Arc::clone(&factory));
        }
        Ok(())
    }

    /// Chaining form of [`register`](Self::register).
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub fn with<F>(mut self, platforms: &[Platform], factory: F) -> Result<Self, DriverError>
    where
        F: Fn(&AutomationConfiguration) -> Result<Box<dyn Backend>, DriverError>
            + Send
            + Sync
            + 'static,
    {
        self.register(platforms, factory)?;
        Ok(self)
    }

    /// Whether a backend is registered for `platform`.
    #[must_use]
    pub fn supports(&self, platform: Platform) -> bool {
        self.factories.contains_key(&platform)
    }

    /// Registered platforms, sorted.
    #[must_use]
    pub fn platforms(&self) -> Vec<Platform> {
        let mut platforms: Vec<Platform> = self.factories.keys().copied().collect();
        platforms.sort_unstable();
        platforms
    }

    /// Build the backend for `configuration.device_platform`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::UnsupportedPlatform`] when nothing is registered
    /// for the platform, or whatever the factory returns.
    pub fn create(
        &self,
        configuration: &AutomationConfiguration,
    ) -> Result<Box<dyn Backend>, DriverError> {
        let platform = configuration.device_platform;
        let factory = self
            .factories
            .get(&platform)
            .ok_or(DriverError::UnsupportedPlatform(platform))?;
        factory(configuration)
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("platforms", &self.platforms())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;

    fn fake(
        name: &'static str,
    ) -> impl Fn(&AutomationConfiguration) -> Result<Box<dyn Backend>, DriverError> {
        move |_: &AutomationConfiguration| Ok(Box::new(FakeBackend::new(name)) as Box<dyn Backend>)
    }

    fn config_for(platform: Platform) -> AutomationConfiguration {
        AutomationConfiguration {
            device_platform: platform,
            ..AutomationConfiguration::default()
        }
    }

    #[test]
    fn should_share_one_factory_across_platforms() {
        let registry = BackendRegistry::new()
            .with(&[Platform::Ios, Platform::Tvos, Platform::Maccatalyst], fake("iOS"))
            .unwrap();

        for platform in [Platform::Ios, Platform::Tvos, Platform::Maccatalyst] {
            let backend = registry.create(&config_for(platform)).unwrap();
            assert_eq!(backend.name(), "iOS");
        }
    }

    #[test]
    fn should_reject_platform_claimed_twice() {
        let mut registry = BackendRegistry::new();
        registry.register(&[Platform::Android], fake("Android")).unwrap();

        let result = registry.register(&[Platform::Winappsdk, Platform::Android], fake("Other"));
        assert!(matches!(
            result,
            Err(DriverError::DuplicateBackend(Platform::Android))
        ));
        assert!(!registry.supports(Platform::Winappsdk));
    }

    #[test]
    fn should_reject_platform_listed_twice_in_one_call() {
        let result =
            BackendRegistry::new().with(&[Platform::Ios, Platform::Ios], fake("iOS"));
        assert!(matches!(
            result,
            Err(DriverError::DuplicateBackend(Platform::Ios))
        ));
    }

    #[test]
    fn should_fail_with_unsupported_platform_when_unmapped() {
        let registry = BackendRegistry::new()
            .with(&[Platform::Android], fake("Android"))
            .unwrap();

        let result = registry.create(&config_for(Platform::Macos));
        assert!(matches!(
            result,
            Err(DriverError::UnsupportedPlatform(Platform::Macos))
        ));
    }

    #[test]
    fn should_list_registered_platforms_sorted() {
        let registry = BackendRegistry::new()
            .with(&[Platform::Winappsdk], fake("Windows"))
            .unwrap()
            .with(&[Platform::Android], fake("Android"))
            .unwrap();

        assert_eq!(
            registry.platforms(),
            vec![Platform::Android, Platform::Winappsdk]
        );
        assert_eq!(
            format!("{registry:?}"),
            "BackendRegistry { platforms: [Android, Winappsdk] }"
        );
    }

    #[test]
    fn should_propagate_factory_error() {
        let registry = BackendRegistry::new()
            .with(&[Platform::Android], |_| {
                Err(DriverError::Unsupported {
                    backend: "Android",
                    operation: "connect",
                })
            })
            .unwrap();

        let result = registry.create(&config_for(Platform::Android));
        assert!(matches!(result, Err(DriverError::Unsupported { .. })));
    }
}
