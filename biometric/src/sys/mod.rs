#[cfg(target_os = "android")]
pub mod android;
#[cfg(target_os = "android")]
pub use android::AndroidProvider;

#[cfg(target_os = "windows")]
pub mod windows;
#[cfg(target_os = "windows")]
pub use windows::SystemProvider;

#[cfg(not(any(target_os = "android", target_os = "windows")))]
pub mod stub;
#[cfg(not(any(target_os = "android", target_os = "windows")))]
pub use stub::SystemProvider;
