mod test_aggregator;
