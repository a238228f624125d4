/*!

This is the long-form manual for `election_results` and `apresults`.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values with a header row
* `xlsx` Excel spreadsheet (first worksheet, or the one given with `--excel-worksheet-name`)

Both formats expect one row per candidate and per constituency, with (at least) the following columns:

| Constituency | Candidate    | Party          | Total Votes |
|--------------|--------------|----------------|-------------|
| Kuppam       | N Chandrababu Naidu | Telugu Desam | 121929 |
| ...          |              |                |             |

Other columns are ignored. The names of the columns can be changed in the configuration file.
`Total Votes` must be a non-negative whole number. A candidate may appear only once in a constituency.

## Views

`apresults` computes three views from the dataset:

* the party view: all the results of the selected party, the number of constituencies it contested,
 the total, average and highest number of votes, and the five-number summary of its votes.
* the constituency view: all the candidates of the selected constituency, the total number of votes cast,
 the leading candidate and party, and the vote share of each party in this constituency.
* the overall view: the total votes, average votes and number of contested seats of each party,
 together with its share of all the votes.

Vote shares are percentages rounded to 2 decimals. Exact ties are rounded to the even neighbour
(`0.015` becomes `0.02`, `0.025` becomes `0.02`).

If a statistic cannot be computed (for example the selected party has no candidate in the dataset),
it is left out of the output and the reason is listed in the `errors` field of the view. The other
views are still computed. Vote totals are added without wrapping around: a total that does not fit
in a 64-bit count is reported as an error of the metric that needed it.

Exports of a constituency always use the header `Constituency,Candidate,Party,Total Votes`,
whatever the names of the columns in the input.

## Configuration

```json
{
  "outputSettings": {
    "dashboardName": "Andhra Pradesh Elections 2024",
    "outputDirectory": "output"
  },
  "dataSource": {
    "provider": "csv",
    "filePath": "AP_2024-2.csv"
  },
  "parties": [
    { "name": "Janasena Party", "color": "#FF0000" },
    { "name": "Telugu Desam", "color": "#FFD700" }
  ],
  "selection": {
    "party": "Telugu Desam",
    "constituency": "Kuppam"
  }
}
```

The paths are relative to the location of the configuration file. Any option passed on the command
line overrides the value in the configuration file.

*/
