mod bigquery;
