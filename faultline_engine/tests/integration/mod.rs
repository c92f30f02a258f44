mod catalog_startup;
mod classic_failures;
mod classification_properties;
mod concurrent_classify;
