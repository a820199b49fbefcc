mod coalescing_test;
mod persistence_test;
