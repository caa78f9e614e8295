mod support;
mod watcher_tests;
